use anyhow::Result;

pub trait Engine {
    fn run(&mut self, input: &str) -> Result<String>;

    /// Display forms buffered by `writeln` since the last drain, oldest first.
    fn drain_output(&mut self) -> Vec<String>;
}
