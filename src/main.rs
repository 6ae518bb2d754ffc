fn main() {
    ricochet_arena::game::run();
}
