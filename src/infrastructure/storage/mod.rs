pub mod fs_store;
