fn main() {
    // ESP-IDF build environment propagation — device builds only.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
