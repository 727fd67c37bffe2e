pub mod pvs_report;
pub mod segment;

pub use pvs_report::parse_pvs_report;
pub use segment::Segment;
