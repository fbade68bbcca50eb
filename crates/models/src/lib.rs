pub mod errors;
pub mod db;
pub mod user;
pub mod podcast;
pub mod episode;

#[cfg(test)]
mod tests;
