//! Runtime module — process lifecycle: boot, then one scan run.

pub mod boot;
pub mod run;
