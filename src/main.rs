use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};

use vehicle_catalog::config::environment::EnvironmentConfig;
use vehicle_catalog::database::load_seed_file;
use vehicle_catalog::{create_app, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    info!("🚗 Vehicle Catalog - API REST de vehículos");
    info!("================================================");
    info!("🌍 Entorno: {}", config.environment);

    let addr = config.socket_addr()?;
    let app_state = AppState::in_memory(config.clone());

    // Datos iniciales
    if let Some(seed_file) = &config.seed_file {
        if let Err(e) = load_seed_file(seed_file, &app_state.vehicle_service).await {
            error!("❌ Error cargando datos iniciales: {}", e);
            return Err(anyhow::anyhow!("Error de datos iniciales: {}", e));
        }
    } else if config.is_development() {
        info!("ℹ️ VEHICLES_SEED_FILE no definido, el almacén arranca vacío");
    }
    info!("📦 Vehículos en memoria: {}", app_state.vehicle_service.count().await);

    let app = create_app(app_state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET    /health - Estado del servicio");
    info!("   GET    /vehicles - Listar vehículos");
    info!("   POST   /vehicles - Crear vehículo");
    info!("   POST   /vehicles/batch - Crear varios vehículos");
    info!("   GET    /vehicles/:id - Obtener vehículo");
    info!("   GET    /vehicles/color/:color/year/:year - Buscar por color y año");
    info!("   GET    /vehicles/brand/:brand/between/:start_year/:end_year - Buscar por marca y años");
    info!("   GET    /vehicles/average_speed/brand/:brand - Velocidad media por marca");
    info!("   GET    /vehicles/average_capacity/brand/:brand - Capacidad media por marca");
    info!("   GET    /vehicles/fuel_type/:fuel_type - Buscar por combustible");
    info!("   GET    /vehicles/transmission/:transmission - Buscar por transmisión");
    info!("   GET    /vehicles/dimensions?length=min-max&width=min-max - Buscar por dimensiones");
    info!("   GET    /vehicles/weight?min=&max= - Buscar por peso");
    info!("   PUT    /vehicles/:id/update_speed - Actualizar velocidad máxima");
    info!("   PUT    /vehicles/:id/update_fuel - Actualizar combustible");
    info!("   DELETE /vehicles/:id - Eliminar vehículo");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Servidor terminó con error: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
