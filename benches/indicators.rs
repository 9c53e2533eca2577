#[path = "../tests/fixtures/mod.rs"]
mod fixtures;

use crate::fixtures::{RefBar, load_reference_bars};

use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use std::{cell::RefCell, hint::black_box, rc::Rc, time::Duration};
use tickflow_ta::{
    Adx, AdxConfig, Adxr, AdxrConfig, Aroon, AroonConfig, Atr, AtrConfig, BarStream, Cci,
    CciConfig, Ema, EmaConfig, Macd, MacdConfig, Rsi, RsiConfig, Series, Sma, SmaConfig, Stoch,
    StochConfig, StochRsi, StochRsiConfig, Wma, WmaConfig,
};

fn stream_benchmarks(c: &mut Criterion) {
    let bars = load_reference_bars();
    let mut group = c.benchmark_group("stream");
    group.throughput(Throughput::Elements(bars.len() as u64));
    group.warm_up_time(Duration::from_secs(5));
    group.measurement_time(Duration::from_secs(10));

    macro_rules! stream_bench {
        ($name:expr, $ind_type:ty, $config:expr) => {
            group.bench_function($name, |b| {
                b.iter_batched(
                    || <$ind_type>::new($config),
                    |mut ind| {
                        for bar in &bars {
                            black_box(ind.compute(bar));
                        }
                    },
                    BatchSize::SmallInput,
                );
            });
        };
    }

    stream_bench!("sma20", Sma, SmaConfig::close(20).expect("valid period"));
    stream_bench!("sma200", Sma, SmaConfig::close(200).expect("valid period"));
    stream_bench!("ema20", Ema, EmaConfig::close(20).expect("valid period"));
    stream_bench!("wma20", Wma, WmaConfig::close(20).expect("valid period"));
    stream_bench!("wma200", Wma, WmaConfig::close(200).expect("valid period"));
    stream_bench!("rsi14", Rsi, RsiConfig::close(14).expect("valid period"));
    stream_bench!("macd", Macd, MacdConfig::default());
    stream_bench!("adx14", Adx, AdxConfig::new(14).expect("valid period"));
    stream_bench!("adxr14", Adxr, AdxrConfig::new(14).expect("valid period"));
    stream_bench!("atr14", Atr, AtrConfig::new(14).expect("valid period"));
    stream_bench!("cci20", Cci, CciConfig::new(20).expect("valid period"));
    stream_bench!("cci200", Cci, CciConfig::new(200).expect("valid period"));
    stream_bench!("aroon25", Aroon, AroonConfig::new(25).expect("valid period"));
    stream_bench!("stoch", Stoch, StochConfig::default());
    stream_bench!("stochrsi", StochRsi, StochRsiConfig::default());

    group.finish();
}

fn tick_benchmarks(c: &mut Criterion) {
    let bars = load_reference_bars();
    let mut group = c.benchmark_group("tick");
    group.sample_size(200);
    group.noise_threshold(0.03);
    group.warm_up_time(Duration::from_secs(5));
    group.measurement_time(Duration::from_secs(10));

    // Pre-feed all bars except the last, then benchmark a single compute() call.
    let (warmup, last) = bars.split_at(bars.len() - 1);

    macro_rules! tick_bench {
        ($name:expr, $ind_type:ty, $config:expr) => {
            group.bench_function($name, |b| {
                b.iter_batched(
                    || {
                        let mut ind = <$ind_type>::new($config);
                        for bar in warmup {
                            ind.compute(bar);
                        }
                        ind
                    },
                    |mut ind| {
                        black_box(ind.compute(&last[0]));
                    },
                    BatchSize::SmallInput,
                );
            });
        };
    }

    tick_bench!("sma200", Sma, SmaConfig::close(200).expect("valid period"));
    tick_bench!("wma200", Wma, WmaConfig::close(200).expect("valid period"));
    tick_bench!("macd", Macd, MacdConfig::default());
    tick_bench!("adxr14", Adxr, AdxrConfig::new(14).expect("valid period"));
    tick_bench!("cci200", Cci, CciConfig::new(200).expect("valid period"));
    tick_bench!("aroon25", Aroon, AroonConfig::new(25).expect("valid period"));
    tick_bench!("stochrsi", StochRsi, StochRsiConfig::default());

    group.finish();
}

fn fan_out_benchmarks(c: &mut Criterion) {
    let bars = load_reference_bars();
    let mut group = c.benchmark_group("fan_out");
    group.throughput(Throughput::Elements(bars.len() as u64));
    group.warm_up_time(Duration::from_secs(5));
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("stream_4_series", |b| {
        b.iter_batched(
            || {
                let mut stream: BarStream<'_, RefBar> = BarStream::new();
                let len = bars.len();
                stream.subscribe(Rc::new(RefCell::new(Series::with_source_len(
                    Macd::new(MacdConfig::default()),
                    len,
                ))));
                stream.subscribe(Rc::new(RefCell::new(Series::with_source_len(
                    Adx::new(AdxConfig::default()),
                    len,
                ))));
                stream.subscribe(Rc::new(RefCell::new(Series::with_source_len(
                    Atr::new(AtrConfig::default()),
                    len,
                ))));
                stream.subscribe(Rc::new(RefCell::new(Series::with_source_len(
                    Stoch::new(StochConfig::default()),
                    len,
                ))));
                stream
            },
            |mut stream| {
                for bar in &bars {
                    stream.publish(bar.clone());
                }
                black_box(stream.published());
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(
    benches,
    stream_benchmarks,
    tick_benchmarks,
    fan_out_benchmarks
);
criterion_main!(benches);
