pub mod reference_data_seed;
