pub mod error;
pub mod net;
pub mod proto;
pub mod sim;

#[cfg(test)]
mod test;
