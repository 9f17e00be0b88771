pub mod episode_writer;

pub use episode_writer::{CsvEpisodeWriter, EpisodeWriter, InMemoryEpisodeWriter};
