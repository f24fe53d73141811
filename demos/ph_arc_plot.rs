use std::error::Error;

use gnuplot::{AxesCommon, Caption, Color, Figure, PointSymbol};
use ph5_motion::{Complex, Curve, FeedConfig, FeedExecutor, FeedProfile};

fn main() -> Result<(), Box<dyn Error>> {
    // Verbosity is the only outside setting the library cares about.
    let level = match std::env::var("PH5_LOG").as_deref() {
        Ok("trace") => tracing::Level::TRACE,
        Ok("debug") => tracing::Level::DEBUG,
        Ok("warn") => tracing::Level::WARN,
        _ => tracing::Level::INFO,
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    // -----------------------
    // 1. Curve coefficients
    // -----------------------
    // PH quintic through (-1,1), (0,2), (1,1). z[0] is a placeholder.
    let z = [
        Complex::ZERO,
        Complex::new(1.124171968973597, 0.444771808762066),
        Complex::new(1.124171968973597, -0.444771808762066),
    ];
    let q = [
        Complex::new(-1.0, 1.0),
        Complex::new(0.0, 2.0),
        Complex::new(1.0, 1.0),
    ];
    let curve = Curve::try_new(&z, &q)?;

    // -------------------------
    // 2. Feed command
    // -------------------------
    let v_max = 100.0; // maximum velocity (mm/s)
    let tv_max = 0.01; // time to reach maximum velocity (s)
    let config = FeedConfig::new(v_max, tv_max).with_velocities(0.0, v_max, 0.0);
    let feed = FeedProfile::try_new(&curve, config)?;

    tracing::info!(
        pattern = %feed.pattern(),
        length = feed.total_length(),
        duration = feed.t_s(),
        "feed planned"
    );

    // --------------------------------
    // 3. Sample at a fixed tick rate
    // --------------------------------
    let sampling_rate = 10_000.0; // ticks per second
    let mut executor = FeedExecutor::new(&feed, sampling_rate);

    let mut time_axis = vec![0.0];
    let mut xs = vec![executor.get_pos().re];
    let mut ys = vec![executor.get_pos().im];
    let mut dist = vec![0.0];
    while !executor.is_done() {
        executor.tick();
        time_axis.push(executor.get_time());
        xs.push(executor.get_pos().re);
        ys.push(executor.get_pos().im);
        dist.push(executor.get_s());
    }

    let end = executor.get_pos();
    if !end.approx_eq(Complex::new(1.0, 1.0), 1e-6) {
        tracing::warn!(%end, "traversal did not end on the last knot");
    }
    if feed.shortfalls() > 0 {
        tracing::warn!(count = feed.shortfalls(), "Newton-Raphson shortfalls");
    }

    // --------------
    // 4. Plot data
    // --------------
    let mut fg = Figure::new();
    {
        let axes = fg.axes2d();
        axes.set_title("PH quintic arc sampled at constant time steps", &[]);
        axes.set_x_label("X", &[]);
        axes.set_y_label("Y", &[]);
        axes.points(&xs, &ys, &[Color("blue"), Caption("r(E)"), PointSymbol('.')]);
    }
    fg.show().map_err(|e| format!("Failed to display plot: {e}"))?;

    let mut fg = Figure::new();
    {
        let axes = fg.axes2d();
        axes.set_title("Arc length vs. time", &[]);
        axes.set_x_label("Time (s)", &[]);
        axes.set_y_label("s (mm)", &[]);
        axes.lines(&time_axis, &dist, &[Color("red"), Caption("s(E(t))")]);
    }
    fg.show().map_err(|e| format!("Failed to display plot: {e}"))?;

    println!("Plot generated. Total motion time: {:.5} seconds.", feed.t_s());
    Ok(())
}
