pub mod strips;
