pub mod strand;
pub mod enzyme;
pub mod exec;
pub mod lineage;
pub mod roster;
