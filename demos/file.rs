use flagtag::derive::Flags;
use flagtag::{ext::File, Context, Helper};

#[derive(Default, Flags)]
struct Argv {
    #[flag(embed)]
    helper: Helper,
    #[flag(cli = "*f,file", usage = "The file to print (`-` for stdin).")]
    file: File,
}

fn main() {
    std::process::exit(flagtag::run(|ctx: &mut Context<Argv>| {
        ctx.print(ctx.argv().file.content());
        Ok(())
    }));
}
