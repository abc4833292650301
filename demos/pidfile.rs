use flagtag::derive::Flags;
use flagtag::{ext::PidFile, Context, Helper};

#[derive(Default, Flags)]
struct Argv {
    #[flag(embed)]
    helper: Helper,
    #[flag(cli = "pid", dft = "013-pidfile.pid", usage = "The pid file to hold while running.")]
    pid_file: PidFile,
}

fn main() {
    std::process::exit(flagtag::run(|ctx: &mut Context<Argv>| {
        let pid_file = &ctx.argv().pid_file;
        let _guard = pid_file.create()?;
        ctx.print(format!("holding {}", pid_file.path().display()));
        Ok(())
    }));
}
