pub mod age;
pub mod measurement;
pub mod percentile;
pub mod result;
pub mod sex;
pub mod standard;
