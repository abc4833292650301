use flagtag::derive::Flags;
use flagtag::{Context, Helper};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize, Serialize)]
struct Config {
    a: String,
    b: i64,
    c: bool,
}

#[derive(Default, Flags)]
struct Argv {
    #[flag(embed)]
    helper: Helper,
    #[flag(cli = "c,config", parser = "jsonfile", usage = "The json configuration file.")]
    config: Config,
}

fn main() {
    std::process::exit(flagtag::run(|ctx: &mut Context<Argv>| {
        ctx.print_json(&ctx.argv().config)
    }));
}
