fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Server for the service, client for the integration tests
    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile(&["../proto/sso.proto"], &["../proto"])?;

    Ok(())
}
