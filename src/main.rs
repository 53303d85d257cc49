fn main() {
    highlighter::cli::run();
}
