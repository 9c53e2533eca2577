mod fixtures;

use fixtures::reference_test;

reference_test!(
    llv_10_close,
    Llv,
    ExtremumConfig::close(10),
    "tests/fixtures/data/llv-10-close.csv"
);

reference_test!(
    hhv_10_close,
    Hhv,
    ExtremumConfig::close(10),
    "tests/fixtures/data/hhv-10-close.csv"
);

reference_test!(
    rocr100_10_close,
    RocR100,
    RocConfig::close(10),
    "tests/fixtures/data/rocr100-10-close.csv"
);
