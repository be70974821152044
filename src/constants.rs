//! Portal endpoints.

pub const JWCH_PREFIX: &str = "https://jwcjwxt2.fzu.edu.cn:81";
pub const JWCH_REFERER: &str = "https://jwcjwxt1.fzu.edu.cn/";
pub const LOGIN_ORIGIN: &str = "https://jwch.fzu.edu.cn";

pub const VERIFY_CODE_URL: &str = "https://jwcjwxt1.fzu.edu.cn/plus/verifycode.asp";
pub const LOGIN_CHECK_URL: &str = "https://jwcjwxt1.fzu.edu.cn/logincheck.asp";
pub const SSO_LOGIN_URL: &str = "https://jwcjwxt2.fzu.edu.cn/Sfrz/SSOLogin";
pub const SSO_HOST_URL: &str = "https://jwcjwxt2.fzu.edu.cn";
pub const LOGIN_CHK_XS_URL: &str = "https://jwcjwxt2.fzu.edu.cn:81/loginchk_xs.aspx";
pub const AUTO_CAPTCHA_VERIFY_URL: &str =
    "https://statistics.fzuhelper.w2fzu.com/api/login/validateCode?validateCode";

pub const USER_INFO_URL: &str = "https://jwcjwxt2.fzu.edu.cn:81/jcxx/xsxx/StudentInformation.aspx";
pub const COURSE_URL: &str = "https://jwcjwxt2.fzu.edu.cn:81/student/xkjg/wdxk/xkjg_list.aspx";
pub const MARKS_QUERY_URL: &str =
    "https://jwcjwxt2.fzu.edu.cn:81/student/xyzk/cjyl/score_sheet.aspx";
pub const CET_QUERY_URL: &str = "https://jwcjwxt2.fzu.edu.cn:81/student/glbm/cet/cet_cszt.aspx";
pub const JS_QUERY_URL: &str =
    "https://jwcjwxt2.fzu.edu.cn:81/student/glbm/computer/jsj_cszt.aspx";
pub const CREDIT_QUERY_URL: &str =
    "https://jwcjwxt2.fzu.edu.cn:81/student/xyzk/xftj/CreditStatistics.aspx";
pub const GPA_QUERY_URL: &str =
    "https://jwcjwxt2.fzu.edu.cn:81/student/xyzk/jdpm/GPA_sheet.aspx";
pub const CLASSROOM_QUERY_URL: &str = "https://jwcjwxt2.fzu.edu.cn:81/kkgl/kbcx/kbcx_kjs.aspx";
pub const EXAM_ROOM_QUERY_URL: &str =
    "https://jwcjwxt2.fzu.edu.cn:81/student/xkjg/examination/exam_list.aspx";
pub const SCHOOL_CALENDAR_URL: &str = "https://jwcjwxt2.fzu.edu.cn:82/xl.asp";
pub const NOTICE_LIST_URL: &str = "https://jwch.fzu.edu.cn/jxtz.htm";

/// Buildings of the Qishan campus, queried one by one.
pub const QISHAN_BUILDINGS: [&str; 8] = [
    "公共教学楼东1",
    "公共教学楼东2",
    "公共教学楼东3",
    "公共教学楼文科楼",
    "公共教学楼西1",
    "公共教学楼西2",
    "公共教学楼西3",
    "公共教学楼中楼",
];
