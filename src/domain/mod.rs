pub mod case_record;
pub mod monthly;
pub mod timepoint;
pub mod variant;
