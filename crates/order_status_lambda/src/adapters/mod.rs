pub mod redshift_data;
pub mod warehouse;
