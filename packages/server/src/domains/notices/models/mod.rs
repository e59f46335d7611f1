pub mod ack;
pub mod notice;

pub use ack::AckRecord;
pub use notice::NoticeRecord;
