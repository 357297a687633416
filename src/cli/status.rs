use crate::cli::{working_dir, StatusArgs};
use crate::output::{build_snapshot, render_text};
use crate::state::{FileStateStore, StateStore};

pub fn execute(args: StatusArgs) -> anyhow::Result<()> {
    let cwd = working_dir()?;
    let state = FileStateStore::new(&cwd).load()?;
    let snapshot = build_snapshot(&cwd, &state);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print!("{}", render_text(&snapshot));
    }
    Ok(())
}
