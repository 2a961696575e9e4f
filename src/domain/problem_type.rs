//! Problem-type labels returned in the `type` field. The benchmark table is
//! keyed by these strings, so they must stay byte-identical.

// 代數
pub const DIFFERENCE_OF_SQUARES: &str = "فرق بين مربعين";
pub const SUM_OR_DIFFERENCE_OF_CUBES: &str = "مجموع/فرق مكعبين";
pub const COMMON_FACTOR: &str = "إخراج عامل مشترك";
pub const SIMPLE_TRINOMIAL: &str = "مقدار ثلاثي بسيط";
pub const NON_SIMPLE_TRINOMIAL: &str = "مقدار ثلاثي غير بسيط (المقص)";
pub const GROUPING: &str = "تحليل بالتقسيم";
pub const QUADRATIC_FORMULA: &str = "غير قابل للتحليل المباشر (استخدام القانون العام)";
pub const NEGATIVE_DISCRIMINANT: &str = "لا يوجد تحليل في الأعداد الحقيقية (المميز سالب)";
pub const PRIME_EXPRESSION: &str = "مقدار أولي (لا يقبل التحليل)";
pub const GENERAL_FACTORING: &str = "تحليل عام";

// 方程式
pub const LINEAR_EQUATION: &str = "معادلة خطية (درجة أولى)";
pub const QUADRATIC_EQUATION: &str = "معادلة تربيعية (درجة ثانية)";
pub const IMPOSSIBLE_EQUATION: &str = "معادلة مستحيلة الحل";
pub const IDENTITY_EQUATION: &str = "معادلة صحيحة لجميع القيم";
pub const EQUATION: &str = "معادلة";

// 三角
pub const ANGLE_ANALYSIS: &str = "تحليل زاوية";
pub const TRIG_FUNCTIONS: &str = "إيجاد الدوال";

pub fn equation_of_degree(degree: usize) -> String {
    format!("معادلة من الدرجة {}", degree)
}
