mod property {
    mod store_properties;
}
