fn main() -> anyhow::Result<()> {
    molistats_lib::run()
}
