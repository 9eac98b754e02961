use anyhow::Result;
use notebook_widgets_fix::cli::run_from_args;

fn main() -> Result<()> {
    run_from_args()
}
