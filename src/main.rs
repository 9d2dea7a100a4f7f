fn main() {
    seeking_missiles::game::run();
}
