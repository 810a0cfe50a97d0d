pub mod autopsy;
pub mod health;
pub mod legacy;
pub mod recovery;
