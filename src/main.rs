fn main() -> anyhow::Result<()> {
    bomerp_lib::run()
}
