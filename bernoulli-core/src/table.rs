//! Static Bernoulli tables.
//!
//! Each representation ships the first *K* values of B₂ₙ, generated offline
//! from exact rationals and rounded to nearest. For fixed-width floats the
//! table stops exactly at the last finite value, so any index past it is an
//! overflow without further computation.

use crate::value::BernoulliValue;
use num_bigint::BigInt;
use num_rational::BigRational;
use once_cell::sync::Lazy;

/// How a representation serves indices past its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableStrategy {
    /// The table holds every finite value; larger indices overflow.
    TableOnly,
    /// Larger indices are computed on demand by a growable cache.
    TableThenCache,
}

/// Static table provider for a representation.
pub trait BernoulliTable: BernoulliValue {
    /// Dispatch for indices past [`max_bernoulli_b2n`].
    const STRATEGY: TableStrategy;

    /// B₂ₙ for n in `0..=max_bernoulli_b2n::<Self>()`.
    fn table() -> &'static [Self];
}

/// Largest index served by the static table of `T`.
pub fn max_bernoulli_b2n<T: BernoulliTable>() -> usize {
    T::table().len() - 1
}

/// Static-table lookup, `None` past the table's bound.
pub fn lookup<T: BernoulliTable>(index: usize) -> Option<T> {
    T::table().get(index).cloned()
}

/// Alias of [`lookup`] under the name callers of the unchecked API expect.
pub fn unchecked_bernoulli_b2n<T: BernoulliTable>(index: usize) -> Option<T> {
    lookup(index)
}

/// First index whose B₂ₙ is known not to fit `T`, if bounded.
pub fn overflow_threshold<T: BernoulliTable>() -> Option<usize> {
    match T::STRATEGY {
        TableStrategy::TableOnly => Some(T::table().len()),
        TableStrategy::TableThenCache => None,
    }
}

impl BernoulliTable for f32 {
    const STRATEGY: TableStrategy = TableStrategy::TableOnly;

    fn table() -> &'static [Self] {
        &B2N_F32
    }
}

impl BernoulliTable for f64 {
    const STRATEGY: TableStrategy = TableStrategy::TableOnly;

    fn table() -> &'static [Self] {
        &B2N_F64
    }
}

impl BernoulliTable for BigRational {
    const STRATEGY: TableStrategy = TableStrategy::TableThenCache;

    fn table() -> &'static [Self] {
        &B2N_RATIONAL
    }
}

static B2N_RATIONAL: Lazy<Vec<BigRational>> = Lazy::new(|| {
    B2N_RATIONAL_DIGITS
        .iter()
        .map(|(num, den)| {
            let num: BigInt = num.parse().expect("static numerator literal");
            let den: BigInt = den.parse().expect("static denominator literal");
            BigRational::new(num, den)
        })
        .collect()
});

// ============================================================================
// TABLE DATA
// ============================================================================

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
static B2N_F32: [f32; 33] = [
    1.0e0,
    1.6666667e-1,
    -3.33333333e-2,
    2.3809524e-2,
    -3.33333333e-2,
    7.575758e-2,
    -2.53113553e-1,
    1.16666667e0,
    -7.092157e0,
    5.4971178e1,
    -5.2912424e2,
    6.192123e3,
    -8.658025e4,
    1.42551717e6,
    -2.7298231e7,
    6.0158087e8,
    -1.5116316e10,
    4.2961464e11,
    -1.3711655e13,
    4.883323e14,
    -1.929658e16,
    8.4169305e17,
    -4.0338072e19,
    2.1150749e21,
    -1.20866265e23,
    7.500867e24,
    -5.038778e26,
    3.65287765e28,
    -2.849877e30,
    2.3865427e32,
    -2.139995e34,
    2.0500976e36,
    -2.0938006e38,
];

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
static B2N_F64: [f64; 130] = [
    1.0,
    0.16666666666666666,
    -0.03333333333333333,
    0.023809523809523808,
    -0.03333333333333333,
    0.07575757575757576,
    -0.2531135531135531,
    1.1666666666666667,
    -7.092156862745098,
    54.971177944862156,
    -529.1242424242424,
    6192.123188405797,
    -86580.25311355312,
    1425517.1666666667,
    -27298231.067816094,
    601580873.9006424,
    -15116315767.092157,
    429614643061.1667,
    -13711655205088.332,
    488332318973593.2,
    -1.9296579341940068e16,
    8.416930475736826e17,
    -4.0338071854059454e19,
    2.1150748638081993e21,
    -1.2086626522296526e23,
    7.500866746076964e24,
    -5.038778101481069e26,
    3.6528776484818122e28,
    -2.849876930245088e30,
    2.3865427499683627e32,
    -2.1399949257225335e34,
    2.0500975723478097e36,
    -2.093800591134638e38,
    2.2752696488463515e40,
    -2.6257710286239577e42,
    3.212508210271803e44,
    -4.159827816679471e46,
    5.692069548203528e48,
    -8.218362941978458e50,
    1.2502904327166994e53,
    -2.001558323324837e55,
    3.3674982915364376e57,
    -5.947097050313545e59,
    1.1011910323627977e62,
    -2.1355259545253502e64,
    4.3328896986641194e66,
    -9.188552824166933e68,
    2.0346896776329074e71,
    -4.700383395803573e73,
    1.131804344548425e76,
    -2.8382249570693707e78,
    7.406424897967885e80,
    -2.0096454802756605e83,
    5.665717005080594e85,
    -1.6584511154136216e88,
    5.036885995049238e90,
    -1.5861468237658186e93,
    5.1756743617545625e95,
    -1.7488921840217116e98,
    6.116051999495218e100,
    -2.2122776912707833e103,
    8.272277679877097e105,
    -3.195892511141571e108,
    1.2750082223387793e111,
    -5.250092308677413e113,
    2.2301817894241627e116,
    -9.76845219309552e118,
    4.409836197845295e121,
    -2.050857088646409e124,
    9.821443327979128e126,
    -4.841260079820888e129,
    2.4553088801480982e132,
    -1.2806926804084748e135,
    6.867616710466858e137,
    -3.7846468581969106e140,
    2.142610125066529e143,
    -1.2456727137183695e146,
    7.434578755100016e148,
    -4.5535795304641704e151,
    2.861211281685887e154,
    -1.843772355203387e157,
    1.2181154536221047e160,
    -8.248218718531412e162,
    5.722587793783294e165,
    -4.0668530525059105e168,
    2.9596092064642052e171,
    -2.2049522565189457e174,
    1.68125970728896e177,
    -1.3116736213556958e180,
    1.0467894009478039e183,
    -8.543289357883371e185,
    7.128782132248655e188,
    -6.08029314555359e191,
    5.299677642484992e194,
    -4.719425916874586e197,
    4.292841379140298e200,
    -3.9876744968232205e203,
    3.781978041935888e206,
    -3.661423368368119e209,
    3.617609027237286e212,
    -3.647077264519136e215,
    3.750875543645441e218,
    -3.934586729643903e221,
    4.208821114819008e224,
    -4.590229622061792e227,
    5.103172577262957e230,
    -5.782276230365695e233,
    6.676248216783588e236,
    -7.853530764445042e239,
    9.410689406705872e242,
    -1.1484933873465185e246,
    1.4272958742848785e249,
    -1.805955958690931e252,
    2.3261535307660807e255,
    -3.0495751715499594e258,
    4.068580607643398e261,
    -5.523103132197436e264,
    7.6277279396434395e267,
    -1.0715571119697886e271,
    1.5310200895969188e274,
    -2.2244891682179836e277,
    3.286267919069014e280,
    -4.935592895596035e283,
    7.534957120083251e286,
    -1.1691485154584178e290,
    1.843526146783894e293,
    -2.953682617296808e296,
    4.807932127750157e299,
    -7.950212504588525e302,
    1.3352784187354634e306,
];

/// Exact (numerator, denominator) pairs in lowest terms.
#[rustfmt::skip]
static B2N_RATIONAL_DIGITS: [(&str, &str); 40] = [
    ("1", "1"),
    ("1", "6"),
    ("-1", "30"),
    ("1", "42"),
    ("-1", "30"),
    ("5", "66"),
    ("-691", "2730"),
    ("7", "6"),
    ("-3617", "510"),
    ("43867", "798"),
    ("-174611", "330"),
    ("854513", "138"),
    ("-236364091", "2730"),
    ("8553103", "6"),
    ("-23749461029", "870"),
    ("8615841276005", "14322"),
    ("-7709321041217", "510"),
    ("2577687858367", "6"),
    ("-26315271553053477373", "1919190"),
    ("2929993913841559", "6"),
    ("-261082718496449122051", "13530"),
    ("1520097643918070802691", "1806"),
    ("-27833269579301024235023", "690"),
    ("596451111593912163277961", "282"),
    ("-5609403368997817686249127547", "46410"),
    ("495057205241079648212477525", "66"),
    ("-801165718135489957347924991853", "1590"),
    ("29149963634884862421418123812691", "798"),
    ("-2479392929313226753685415739663229", "870"),
    ("84483613348880041862046775994036021", "354"),
    ("-1215233140483755572040304994079820246041491", "56786730"),
    ("12300585434086858541953039857403386151", "6"),
    ("-106783830147866529886385444979142647942017", "510"),
    ("1472600022126335654051619428551932342241899101", "64722"),
    ("-78773130858718728141909149208474606244347001", "30"),
    ("1505381347333367003803076567377857208511438160235", "4686"),
    ("-5827954961669944110438277244641067365282488301844260429", "140100870"),
    ("34152417289221168014330073731472635186688307783087", "6"),
    ("-24655088825935372707687196040585199904365267828865801", "30"),
    ("414846365575400828295179035549542073492199375372400483487", "3318"),
];
