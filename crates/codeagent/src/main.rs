fn main() -> anyhow::Result<()> {
    codeagent::initialize_command_line()
}
