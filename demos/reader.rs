use flagtag::derive::Flags;
use flagtag::{ext::Reader, Context, Helper};
use std::io::Read;

#[derive(Default, Flags)]
struct Argv {
    #[flag(embed)]
    helper: Helper,
    #[flag(cli = "r,reader", usage = "The stream to read: a file, an http(s) url, or `-` for stdin.")]
    reader: Reader,
}

fn main() {
    std::process::exit(flagtag::run(|ctx: &mut Context<Argv>| {
        let mut first = String::default();
        let reader = &mut ctx.argv_mut().reader;
        reader.read_to_string(&mut first)?;
        let name = reader.name().to_string();
        let is_stdin = reader.is_stdin();
        reader.close();

        reader.set_reader("replaced by the program".as_bytes());
        let mut second = String::default();
        reader.read_to_string(&mut second)?;

        ctx.print(format!("read from {name} (stdin: {is_stdin}):"));
        ctx.print(first);
        ctx.print(second);
        Ok(())
    }));
}
