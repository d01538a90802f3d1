pub mod caesar;
pub mod otp;
pub mod rot13;
pub mod vigenere;

pub use rot13::rot13;
