pub mod bitarray;
pub mod bitset;
