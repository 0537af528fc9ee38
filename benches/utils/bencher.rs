use std::env;
use std::path::PathBuf;

use criterion::measurement::WallTime;
use criterion::{Bencher, BenchmarkGroup, BenchmarkId, Criterion};

pub struct BenchGroup<'a> {
    pub criterion_group: BenchmarkGroup<'a, WallTime>,
}

pub fn run_bench<F>(bench_fn: F, name: &str)
where
    F: FnOnce(&mut BenchGroup),
{
    if env::var("PIN_TO_CPU0").is_ok() {
        pin_process_to_cpu0();
    }

    let output_dir = criterion_output_directory().join(env::consts::ARCH);
    let mut criterion = Criterion::default()
        .output_directory(&output_dir)
        .configure_from_args();

    let mut group = BenchGroup {
        criterion_group: criterion.benchmark_group(name),
    };
    bench_fn(&mut group);
    group.criterion_group.finish();
    criterion.final_summary();
}

pub fn bench<S1, S2, F>(
    group: &mut BenchGroup,
    sample_size: usize,
    func_name: S1,
    parameter: S2,
    mut f: F,
) where
    S1: Into<String>,
    S2: Into<String>,
    F: FnMut(&mut Bencher),
{
    let parameter = parameter.into();
    group.criterion_group.sample_size(sample_size);
    group.criterion_group.bench_with_input(
        BenchmarkId::new(func_name.into(), &parameter),
        &parameter,
        |bencher, _| f(bencher),
    );
}

/// Pin process to #0 CPU core
pub fn pin_process_to_cpu0() {
    #[cfg(not(target_arch = "wasm32"))]
    {
        let mut cpu_set = nix::sched::CpuSet::new();
        cpu_set.set(0).unwrap();
        nix::sched::sched_setaffinity(nix::unistd::Pid::from_raw(0), &cpu_set).unwrap();
    }
}

fn criterion_output_directory() -> PathBuf {
    if let Some(value) = env::var_os("CRITERION_HOME") {
        PathBuf::from(value)
    } else if let Some(value) = env::var_os("CARGO_TARGET_DIR") {
        PathBuf::from(value).join("criterion")
    } else {
        PathBuf::from("target/criterion")
    }
}
