use flagtag::derive::Flags;
use flagtag::ext::{Duration, Time};
use flagtag::{Context, Helper};

#[derive(Default, Flags)]
struct Argv {
    #[flag(embed)]
    helper: Helper,
    #[flag(cli = "t", usage = "A point in time (ex: 2024-05-01 10:00:00).")]
    time: Time,
    #[flag(cli = "d", dft = "1h30m", usage = "A span of time.")]
    duration: Duration,
}

fn main() {
    std::process::exit(flagtag::run(|ctx: &mut Context<Argv>| {
        let Argv { time, duration, .. } = ctx.argv();
        ctx.print(format!("time={time}, duration={duration}"));
        Ok(())
    }));
}
