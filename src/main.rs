fn main() -> std::process::ExitCode {
    omniconvert_lib::run()
}
