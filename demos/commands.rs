use flagtag::derive::Flags;
use flagtag::ext::Duration;
use flagtag::{App, Command, Context, Helper};

#[derive(Default, Flags)]
struct Greet {
    #[flag(embed)]
    helper: Helper,
    #[flag(cli = "*n,name", usage = "Who to greet.")]
    name: String,
    #[flag(cli = "c,count", dft = "1", env = "GREET_COUNT", usage = "How many times to greet.")]
    count: u32,
}

#[derive(Default, Flags)]
struct Wait {
    #[flag(embed)]
    helper: Helper,
    #[flag(cli = "f,for", dft = "250ms", usage = "How long to wait.")]
    duration: Duration,
    verbose: bool,
}

fn greet(ctx: &mut Context<Greet>) -> anyhow::Result<()> {
    for _ in 0..ctx.argv().count {
        ctx.print(format!("hello {}", ctx.argv().name));
    }

    Ok(())
}

fn wait(ctx: &mut Context<Wait>) -> anyhow::Result<()> {
    if ctx.argv().verbose {
        ctx.print(format!("waiting {}", ctx.argv().duration));
    }

    std::thread::sleep(*ctx.argv().duration);
    Ok(())
}

fn main() {
    let app = App::new("commands")
        .command(Command::new("greet", "Greet somebody.", greet))
        .command(
            Command::group("time", "Time related commands.").register(Command::new(
                "wait",
                "Wait for a while.",
                wait,
            )),
        );

    std::process::exit(app.run_args());
}
