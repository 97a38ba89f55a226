pub mod crosswalk;
