use std::io;

fn main() -> io::Result<()> {
    env_logger::init();

    x86sim::cli::main()
}
