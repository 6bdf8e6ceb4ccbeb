fn main() -> std::process::ExitCode {
    server::launch()
}
