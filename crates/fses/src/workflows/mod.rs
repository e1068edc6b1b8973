pub mod nomination;
