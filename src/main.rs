use clonesh::flags::Flags;
use clonesh::shell::Shell;
use std::env;

fn main() -> Result<(), clonesh::error::ShellError> {
    let mut flags = Flags::new();
    let args: Vec<String> = env::args().skip(1).collect();
    flags.parse(&args)?;

    if flags.is_set("help") {
        flags.print_help();
        return Ok(());
    }

    if flags.is_set("version") {
        println!("clonesh {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let level = if flags.is_set("debug") { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut shell = Shell::new(&flags)?;
    shell.run()
}
