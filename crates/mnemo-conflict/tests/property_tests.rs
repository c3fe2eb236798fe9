mod property {
    mod detection_properties;
}
