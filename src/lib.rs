pub mod assembler;
pub mod ast;
pub mod config;
pub mod dump;
pub mod encoder;
pub mod error;
pub mod mif;
pub mod parser;
pub mod symbols;
pub mod tokenizer;

#[cfg(test)]
mod config_tests;
#[cfg(test)]
mod mif_tests;
#[cfg(test)]
mod symbols_tests;
