fn main() {
    rpn::term::main();
}
