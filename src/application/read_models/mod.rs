//! Read models shared by the formatters and the console printer

mod machine_report;

pub use machine_report::MachineReport;
