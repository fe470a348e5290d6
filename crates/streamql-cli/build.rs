use std::env;
use std::fs::{File, create_dir_all};
use std::path::Path;

use clap::{CommandFactory, ValueEnum};
use clap_complete::{Shell, generate_to};
use clap_mangen::Man;

#[path = "src/args.rs"]
#[allow(dead_code)]
mod args;

fn main() {
    println!("cargo:rerun-if-env-changed=STREAMQL_VERSION");
    println!("cargo:rerun-if-env-changed=GEN_ARTIFACTS");

    if option_env!("STREAMQL_VERSION").is_none() {
        println!("cargo:rustc-env=STREAMQL_VERSION={}", env!("CARGO_PKG_VERSION"));
    }

    if let Some(dir) = env::var_os("GEN_ARTIFACTS") {
        let out = &Path::new(&dir);
        create_dir_all(out).unwrap();
        let cmd = &mut args::CliArguments::command();

        Man::new(cmd.clone())
            .render(&mut File::create(out.join("streamql.1")).unwrap())
            .unwrap();

        for subcmd in cmd.get_subcommands() {
            let name = format!("streamql-{}", subcmd.get_name());
            Man::new(subcmd.clone().name(&name))
                .render(&mut File::create(out.join(format!("{name}.1"))).unwrap())
                .unwrap();
        }

        for shell in Shell::value_variants() {
            generate_to(*shell, cmd, "streamql", out).unwrap();
        }
    }
}

/// Also used by `args.rs`.
fn streamql_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
