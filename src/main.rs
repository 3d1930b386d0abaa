fn main() -> anyhow::Result<()> {
    set_log_lib::run()
}
