mod probe;

pub use probe::HttpImageProbe;
