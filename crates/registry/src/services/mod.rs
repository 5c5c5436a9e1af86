pub mod age;
pub mod classification;
pub mod consistency;
