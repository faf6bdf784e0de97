use anyhow::Result;

fn main() -> Result<()> {
    falling_blocks::app::run()
}
