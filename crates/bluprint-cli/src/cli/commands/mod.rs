use super::args::*;

pub mod check;
mod common;
pub mod pair;
pub mod rules;
pub mod validate;

pub fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Check(args) => check::run(args),
        Command::Pair(args) => pair::run(args),
        Command::Rules(args) => rules::run(args),
        Command::Validate(args) => validate::run(args),
    }
}
