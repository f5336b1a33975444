mod error;

use error::{parse_vec3, require_positive, CliError, Result};
use rigging::{
    CatenarySolver, Drive, Envelope, InertialInterpolator, Interpolator, Pid, SolverConfig,
    Stage, Transition,
};

use bevy::math::Vec3;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about)]
/// Numerical rigging helpers. Samples hanging cables and traces transitions,
/// envelopes and PID loops tick by tick, printing one line per sample.
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sample a cable hanging between two anchors.
    Catenary {
        /// Start anchor as x,y,z.
        #[clap(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        from: Vec3,

        /// End anchor as x,y,z.
        #[clap(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        to: Vec3,

        /// The number of segments between the anchors.
        #[clap(short, long, default_value = "16")]
        segments: usize,

        /// The cable length.
        #[clap(short, long)]
        length: f32,

        /// The maximum number of solver iterations.
        #[clap(short, long, default_value = "64")]
        max: usize,

        /// The solver error tolerance.
        #[clap(short, long, default_value = "0.000001")]
        eps: f32,
    },

    /// Trace an interpolator from rest.
    Interpolate {
        /// Maximum speed in progress per second.
        #[clap(long, default_value = "1")]
        max_speed: f32,

        /// Time step in seconds.
        #[clap(long, default_value = "0.1")]
        dt: f32,

        /// The number of ticks to trace.
        #[clap(long, default_value = "20")]
        steps: usize,

        /// Use acceleration and braking instead of constant speed.
        #[clap(long, default_value = "false")]
        inertial: bool,

        /// Acceleration of the inertial interpolator.
        #[clap(long, default_value = "1")]
        acceleration: f32,

        /// Braking acceleration of the inertial interpolator.
        #[clap(long)]
        braking: Option<f32>,

        /// Head for this progress value instead of an end (inertial only).
        #[clap(long)]
        target: Option<f32>,

        /// Start at the end and head back to the start.
        #[clap(long, default_value = "false")]
        regress: bool,
    },

    /// Trace an ADSR envelope that is released after `hold` seconds.
    Envelope {
        #[clap(long, default_value = "0.1")]
        attack: f32,

        #[clap(long, default_value = "0.1")]
        decay: f32,

        #[clap(long, default_value = "0.8")]
        sustain: f32,

        #[clap(long, default_value = "0.2")]
        release: f32,

        #[clap(long, default_value = "0.5")]
        hold: f32,

        #[clap(long, default_value = "0.02")]
        dt: f32,

        #[clap(long, default_value = "50")]
        steps: usize,
    },

    /// Drive a unit mass toward a setpoint with a PID controller.
    Pid {
        #[clap(long, default_value = "4")]
        kp: f32,

        #[clap(long, default_value = "0")]
        ki: f32,

        #[clap(long, default_value = "4")]
        kd: f32,

        #[clap(long, default_value = "1", allow_hyphen_values = true)]
        setpoint: f32,

        #[clap(long, default_value = "0.05")]
        dt: f32,

        #[clap(long, default_value = "100")]
        steps: usize,
    },
}

fn main() {
    env_logger::init();

    let args = Cli::parse();

    if let Err(e) = run(args.command) {
        eprintln!("{}", error_message(&e));
        std::process::exit(1);
    }
}

fn error_message(e: &CliError) -> String {
    format!("Error: {}", e)
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Catenary {
            from,
            to,
            segments,
            length,
            max,
            eps,
        } => {
            let solver = CatenarySolver::new(SolverConfig::new(max, eps));
            let mut points = Vec::new();
            solver.solve(&mut points, from, to, segments, length);

            log::info!("sampled {} points", points.len());
            for p in points {
                println!("{} {} {}", p.x, p.y, p.z);
            }
        }
        Command::Interpolate {
            max_speed,
            dt,
            steps,
            inertial,
            acceleration,
            braking,
            target,
            regress,
        } => {
            let dt = require_positive("dt", dt)?;
            if inertial {
                let mut interp = InertialInterpolator::new()
                    .with_max_speed(max_speed)
                    .with_acceleration(acceleration);
                interp.set_braking_acceleration(braking);
                match (target, regress) {
                    (Some(target), _) => interp.accelerate_to(target),
                    (None, true) => {
                        interp.set_to(1.0);
                        interp.regress();
                    }
                    (None, false) => interp.progress(),
                }
                trace(&mut interp, dt, steps);
            } else {
                if target.is_some() {
                    log::warn!("--target only applies to the inertial interpolator");
                }
                let mut interp = Interpolator::new().with_max_speed(max_speed);
                if regress {
                    interp.set_to(1.0);
                    interp.regress();
                } else {
                    interp.progress();
                }
                trace(&mut interp, dt, steps);
            }
        }
        Command::Envelope {
            attack,
            decay,
            sustain,
            release,
            hold,
            dt,
            steps,
        } => {
            let dt = require_positive("dt", dt)?;
            let mut envelope = Envelope::new(attack, decay, sustain, release);
            envelope.trigger();

            let mut time = 0.0;
            let mut held = true;
            for _ in 0..steps {
                if held && time >= hold {
                    envelope.release();
                    held = false;
                }
                let level = envelope.update(dt);
                time += dt;
                println!("{:.3} {:.4} {:?}", time, level, envelope.stage());
                if envelope.stage() == Stage::Idle {
                    break;
                }
            }
        }
        Command::Pid {
            kp,
            ki,
            kd,
            setpoint,
            dt,
            steps,
        } => {
            let dt = require_positive("dt", dt)?;
            let mut pid = Pid::<f32>::new(kp, ki, kd);
            let (mut x, mut v) = (0.0_f32, 0.0_f32);

            for i in 0..steps {
                let force = pid.update(setpoint - x, dt);
                v += force * dt;
                x += v * dt;
                println!("{:.3} {:.4} {:.4}", (i + 1) as f32 * dt, x, v);
            }
        }
    }

    Ok(())
}

fn trace<D: Drive>(interp: &mut Transition<D>, dt: f32, steps: usize) {
    for i in 0..steps {
        interp.update(dt);
        println!(
            "{:.3} {:.4} {:.4} {:?}",
            (i + 1) as f32 * dt,
            interp.value(),
            interp.velocity(),
            interp.state()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_time_step_is_reported_once() {
        let err = run(Command::Pid {
            kp: 4.0,
            ki: 0.0,
            kd: 4.0,
            setpoint: 1.0,
            dt: 0.0,
            steps: 10,
        })
        .unwrap_err();

        let message = error_message(&err);
        assert_eq!(
            message,
            "Error: Value out of range. dt must be positive, got 0"
        );
        assert_eq!(message.matches("dt must be positive").count(), 1);
    }
}
