use assert_cmd::Command;

pub fn triviad_bin() -> Command {
    #[allow(deprecated)]
    {
        Command::cargo_bin("triviad").expect("triviad test binary should build")
    }
}
