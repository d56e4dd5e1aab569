fn main() {
    spell_arena::game::run();
}
