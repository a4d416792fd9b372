fn main() {
    foundry_role::app::cli::run();
}
