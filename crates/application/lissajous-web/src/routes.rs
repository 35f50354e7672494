//! Route definitions for the viewer

/// All routes defined in the application
pub const ROUTES: &[(&str, &str, &str)] = &[
    // Page routes
    ("GET", "/", "Viewer page"),

    // HTMX partial routes
    ("GET", "/htmx/knot", "Plot fragment for the form values"),

    // API routes
    ("GET", "/api/knot", "Points, shadows and closure as JSON"),
    ("GET", "/api/knot.svg", "Standalone SVG scene"),
    ("GET", "/api/health", "Health check"),
    ("GET", "/api/status", "Uptime, render count and defaults"),

    // Static assets
    ("GET", "/static/style.css", "CSS stylesheet"),
];

/// Print all routes
pub fn print_routes() {
    println!("\nLissajous Knots Routes:");
    println!("{:-<60}", "");
    for (method, path, desc) in ROUTES {
        println!("{:6} {:20} {}", method, path, desc);
    }
    println!();
}
